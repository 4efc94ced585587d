//! Configuration of the `fa` binary, read from TOML files.
//!
//! Every config struct comes with a partial twin where each field is
//! optional. Files are deserialized into the partial struct and missing
//! fields are filled with the defaults, so a config file only has to mention
//! what it changes.

use anyhow::Context;

use crate::logger::LogLevel;

pub trait IntoOr<T> {
    fn into_or(self, or: T) -> T;
}

impl<T> IntoOr<T> for Option<T> {
    fn into_or(self, or: T) -> T {
        self.unwrap_or(or)
    }
}

/// Declares a config struct together with its `Partial*` twin.
///
/// Fields are written as `name: Type = default`. Nested configs name their
/// partial type with `name: Type as PartialType = default`.
macro_rules! config {
    (@partial $ty:ty) => { Option<$ty> };
    (@partial $ty:ty, $partial:ty) => { Option<$partial> };
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $( $field:ident : $ty:ty $( as $partial:ty )? = $default:expr ),* $(,)?
        }
    ) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, serde::Serialize)]
            pub struct $name {
                $( $field: $ty, )*
            }

            #[derive(Debug, Clone, Default, serde::Deserialize)]
            pub struct [<Partial $name>] {
                $( $field: config!(@partial $ty $(, $partial)?), )*
            }

            impl $name {
                pub fn from_partial(partial: [<Partial $name>]) -> Self {
                    Self {
                        $( $field: partial.$field.into_or($default), )*
                    }
                }

                pub fn from_file<P: AsRef<std::path::Path>>(file_path: P) -> anyhow::Result<Self> {
                    let file_path = file_path.as_ref();
                    let content = std::fs::read_to_string(file_path).with_context(|| {
                        format!("failed to read config file {}", file_path.display())
                    })?;

                    Self::from_toml(&content)
                        .with_context(|| format!("invalid config file {}", file_path.display()))
                }

                pub fn from_optional_file<P: AsRef<std::path::Path>>(
                    file_path: Option<P>,
                ) -> anyhow::Result<Self> {
                    match file_path {
                        Some(path) => Self::from_file(path),
                        None => Ok(Self::default()),
                    }
                }

                pub fn from_toml(content: &str) -> anyhow::Result<Self> {
                    let partial: [<Partial $name>] = toml::from_str(content)?;
                    Ok(Self::from_partial(partial))
                }

                $(
                    pub fn [<with_ $field>](mut self, $field: $ty) -> Self {
                        self.$field = $field;
                        self
                    }

                    pub fn [<set_ $field>](&mut self, $field: $ty) {
                        self.$field = $field;
                    }

                    pub fn [<get_ $field>](&self) -> &$ty {
                        &self.$field
                    }
                )*
            }

            impl Default for $name {
                fn default() -> Self {
                    Self {
                        $( $field: $default, )*
                    }
                }
            }

            impl IntoOr<$name> for Option<[<Partial $name>]> {
                fn into_or(self, or: $name) -> $name {
                    match self {
                        Some(partial) => $name::from_partial(partial),
                        None => or,
                    }
                }
            }
        }
    };
}

config! {
    /// Controls the tracing subscriber installed by the binary.
    pub struct LoggerConfig {
        enabled: bool = true,
        log_file: bool = false,
        log_level: LogLevel = LogLevel::Warn,
    }
}

config! {
    /// The external command that turns DOT text into an image, invoked as
    /// `<command> -T<format> -o <file>`.
    pub struct RenderConfig {
        command: String = "dot".to_string(),
        format: String = "png".to_string(),
    }
}

config! {
    pub struct AutomataConfig {
        logger: LoggerConfig as PartialLoggerConfig = LoggerConfig::default(),
        render: RenderConfig as PartialRenderConfig = RenderConfig::default(),
    }
}
