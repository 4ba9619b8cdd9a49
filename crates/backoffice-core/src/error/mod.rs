//! Type-erased errors with tracing functionalities.
use crate::SharedString;
use std::{error, fmt};

mod source;

pub use source::Source;

/// An error type backed by an allocation-optimized string.
#[derive(Debug)]
pub struct Error {
    /// Error message.
    message: SharedString,
    /// Error source.
    source: Option<Box<Error>>,
}

impl Error {
    /// Creates a new instance with the supplied message.
    #[inline]
    pub fn new(message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new instance with the supplied message and the error source.
    #[inline]
    pub fn with_source(message: impl Into<SharedString>, source: impl Into<Error>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source.into())),
        }
    }

    /// Returns a new instance with the supplied message and `self` as the error source.
    #[inline]
    pub fn wrap(self, message: impl Into<SharedString>) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// Returns the error source.
    #[inline]
    pub fn source(&self) -> Option<&Error> {
        self.source.as_deref()
    }

    /// Returns an iterator of the source errors contained by `self`.
    #[inline]
    pub fn sources(&self) -> Source<'_> {
        Source::new(self)
    }
}

impl<E: error::Error + 'static> From<E> for Error {
    #[inline]
    fn from(err: E) -> Self {
        Self {
            message: err.to_string().into(),
            source: err.source().map(|err| Box::new(Self::new(err.to_string()))),
        }
    }
}

impl fmt::Display for Error {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = &self.message;
        if let Some(source) = &self.source {
            write!(f, "{message}: {source}")
        } else {
            write!(f, "{message}")
        }
    }
}

/// Returns early with an error.
#[macro_export]
macro_rules! bail {
    ($message:literal $(,)?) => {
        return Err($crate::error::Error::new(format!($message)));
    };
    ($err:expr $(,)?) => {
        return Err($crate::error::Error::from($err));
    };
    ($fmt:expr, $($arg:tt)+) => {
        return Err($crate::error::Error::new(format!($fmt, $($arg)+)));
    };
}

/// Constructs an error and emits a warning event for it.
#[macro_export]
macro_rules! warn {
    ($message:literal $(,)?) => {{
        let err = $crate::error::Error::new(format!($message));
        ::tracing::warn!("{}", err.message());
        err
    }};
    ($fmt:expr, $($arg:tt)+) => {{
        let err = $crate::error::Error::new(format!($fmt, $($arg)+));
        ::tracing::warn!("{}", err.message());
        err
    }};
}

#[cfg(test)]
mod tests {
    use super::Error;

    fn parse_port(s: &str) -> Result<u16, Error> {
        if s.is_empty() {
            crate::bail!("port should be nonempty");
        }
        let port = s
            .parse::<u16>()
            .map_err(|err| Error::with_source(format!("invalid port `{s}`"), err))?;
        Ok(port)
    }

    #[test]
    fn it_wraps_error_sources() {
        assert_eq!(parse_port("8080").unwrap(), 8080);

        let err = parse_port("").unwrap_err();
        assert_eq!(err.message(), "port should be nonempty");
        assert!(err.source().is_none());

        let err = parse_port("http").unwrap_err().wrap("fail to load the config");
        assert_eq!(err.sources().count(), 3);
        assert_eq!(
            err.sources().last().map(|err| err.message()),
            Some("invalid digit found in string")
        );
        assert!(err.to_string().starts_with("fail to load the config: invalid port `http`"));
    }

    #[test]
    fn it_warns_with_formatted_message() {
        let key = "date-required";
        let err = crate::warn!("fail to get the localization message for `{}`", key);
        assert_eq!(
            err.message(),
            "fail to get the localization message for `date-required`"
        );
    }
}
