/// Events emitted by a registrar while serving a decorated type.
///
/// These events are passed to the tracing callback set via
/// `Singleton::set_trace_callback`. The `Clone` derive allows callbacks to
/// store or forward events if needed.
///
/// # Examples
///
/// ```rust
/// use singleton_registrar::RegistrarEvent;
///
/// let event = RegistrarEvent::Allocate { type_name: "app::Config" };
/// assert_eq!(event.to_string(), "allocate { type_name: app::Config }");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrarEvent {
    /// A construction call allocated and stored the instance.
    Allocate {
        /// The type name of the decorated type (e.g., "my_app::Config")
        type_name: &'static str,
    },

    /// A construction call found the instance already stored.
    Reuse {
        /// The type name of the decorated type
        type_name: &'static str,
    },

    /// The per-call setup step ran against the shared instance.
    Setup {
        /// The type name of the decorated type
        type_name: &'static str,
        /// Whether setup returned `Ok`
        ok: bool,
    },

    /// The cached instance was requested without constructing.
    Get {
        /// The type name of the decorated type
        type_name: &'static str,
        /// Whether an instance was stored
        found: bool,
    },

    /// An initialization check was performed.
    Contains {
        /// The type name of the decorated type
        type_name: &'static str,
        /// Whether an instance was stored
        found: bool,
    },
}

impl std::fmt::Display for RegistrarEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistrarEvent::Allocate { type_name } => {
                write!(f, "allocate {{ type_name: {} }}", type_name)
            }
            RegistrarEvent::Reuse { type_name } => {
                write!(f, "reuse {{ type_name: {} }}", type_name)
            }
            RegistrarEvent::Setup { type_name, ok } => {
                write!(f, "setup {{ type_name: {}, ok: {} }}", type_name, ok)
            }
            RegistrarEvent::Get { type_name, found } => {
                write!(f, "get {{ type_name: {}, found: {} }}", type_name, found)
            }
            RegistrarEvent::Contains { type_name, found } => {
                write!(
                    f,
                    "contains {{ type_name: {}, found: {} }}",
                    type_name, found
                )
            }
        }
    }
}
