/// Creates a single text [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use gabble::{Role, gb_msg};
///
/// let message = gb_msg!(model => "Done.");
/// assert_eq!(message.role, Role::Model);
/// assert_eq!(message.first_text(), Some("Done."));
/// ```
#[macro_export]
macro_rules! gb_msg {
    (user => $content:expr $(,)?) => {
        $crate::Message::user($content)
    };
    (model => $content:expr $(,)?) => {
        $crate::Message::model($content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use user or model");
    };
}

/// Creates a `Vec<Message>` from role/content pairs, e.g. to seed a history.
///
/// ```rust
/// use gabble::{Role, gb_messages};
///
/// let messages = gb_messages![
///     user => "ping",
///     model => "pong",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[1].role, Role::Model);
/// ```
#[macro_export]
macro_rules! gb_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::gb_msg!($role => $content)),+]
    };
}

/// Builds [`FunctionArgs`](crate::FunctionArgs), stringifying each value.
///
/// ```rust
/// use gabble::gb_args;
///
/// let args = gb_args! { "year" => 2024, "city" => "Kyoto" };
/// assert_eq!(args["year"], "2024");
/// assert_eq!(args["city"], "Kyoto");
/// ```
#[macro_export]
macro_rules! gb_args {
    () => {
        $crate::FunctionArgs::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::FunctionArgs::new();
        $(args.insert(::std::string::ToString::to_string(&$name), ::std::string::ToString::to_string(&$value));)+
        args
    }};
}
