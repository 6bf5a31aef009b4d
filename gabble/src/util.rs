//! Small convenience constructors for common types.

use gprovider::{
    Blob, FunctionDeclaration, HarmBlockThreshold, HarmCategory, Message, Part, Role, Schema,
    SafetySettings,
};

pub fn user_message(text: impl Into<String>) -> Message {
    Message::user(text)
}

pub fn model_message(text: impl Into<String>) -> Message {
    Message::model(text)
}

/// A user message carrying `text` followed by a PNG image.
pub fn image_message(text: impl Into<String>, image_png: &[u8]) -> Message {
    Message::new(
        Role::User,
        vec![Part::text(text), Part::InlineData(Blob::png(image_png))],
    )
}

/// The same threshold for every harm category.
pub fn uniform_safety_settings(threshold: HarmBlockThreshold) -> SafetySettings {
    HarmCategory::ALL
        .into_iter()
        .map(|category| (category, threshold))
        .collect()
}

/// Declares a function whose parameters are all required 32-bit integers.
pub fn integer_function(
    name: impl Into<String>,
    description: impl Into<String>,
    parameters: &[(&str, &str)],
) -> FunctionDeclaration {
    let schema = parameters
        .iter()
        .fold(Schema::object(), |schema, (field, label)| {
            schema.with_required_property(
                *field,
                Schema::integer()
                    .with_format("int32")
                    .with_description(*label),
            )
        });

    FunctionDeclaration::new(name, description).with_parameters(schema)
}
