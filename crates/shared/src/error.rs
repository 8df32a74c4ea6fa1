#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    User(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("forbidden")]
    Forbidden,

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<argon2::password_hash::Error> for Error {
    fn from(value: argon2::password_hash::Error) -> Self {
        Self::Unknown(anyhow::anyhow!(value))
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<image::ImageError> for Error {
    fn from(value: image::ImageError) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! user {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::User(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::User(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::User(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::NotFound(format!($err)))
    };
}

#[macro_export]
macro_rules! forbidden {
    () => {
        return Err($crate::Error::Forbidden)
    };
}

#[macro_export]
macro_rules! server {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(found: bool) -> Result<()> {
        if !found {
            crate::not_found!("meal");
        }

        Ok(())
    }

    fn register(taken: bool) -> Result<()> {
        if taken {
            crate::user!("A user with that username already exists.");
        }

        Ok(())
    }

    #[test]
    fn test_macros_return_typed_errors() {
        assert_eq!(lookup(false).unwrap_err().to_string(), "meal not found");
        assert!(lookup(true).is_ok());

        let err = register(true).unwrap_err();
        assert!(matches!(err, Error::User(_)));
        assert_eq!(err.to_string(), "A user with that username already exists.");
    }
}
