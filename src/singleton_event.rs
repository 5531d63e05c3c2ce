/// Events emitted by the singleton registry during operations.
///
/// These events are passed to the tracing callback set via `set_trace_callback`.
/// The `Clone` derive allows callbacks to store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_proxy::SingletonEvent;
///
/// let event = SingletonEvent::Create { type_name: "app::Config" };
/// assert_eq!(event.to_string(), "create { type_name: app::Config }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingletonEvent {
    /// An instance was requested through `get_instance` or `peek_instance`.
    Get {
        /// The type name of the singleton (e.g., "app::Config")
        type_name: &'static str,
        /// Whether an instance already existed
        found: bool,
    },

    /// A fresh instance was constructed and stored.
    Create {
        /// The type name of the constructed singleton
        type_name: &'static str,
    },

    /// The slot of a type was emptied.
    Reset {
        /// The type name that was reset
        type_name: &'static str,
        /// Whether there was an instance to discard
        found: bool,
    },

    /// A slot existence check was performed.
    Contains {
        /// The type name that was checked
        type_name: &'static str,
        /// Whether the slot holds an instance
        found: bool,
    },

    /// Every slot was emptied.
    Clear {},
}

impl std::fmt::Display for SingletonEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SingletonEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {}, found: {} }}", type_name, found)
            }
            SingletonEvent::Create { type_name } => {
                write!(f, "create {{ type_name: {} }}", type_name)
            }
            SingletonEvent::Reset { type_name, found } => {
                write!(f, "reset {{ type_name: {}, found: {} }}", type_name, found)
            }
            SingletonEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
            SingletonEvent::Clear {} => write!(f, "Clearing all singleton instances"),
        }
    }
}
