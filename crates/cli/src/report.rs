use std::error;
use std::fmt;

pub type Report<T> = Result<T, Error>;

type Source = Box<dyn error::Error + Send + Sync>;

#[derive(Debug)]
pub struct Error {
    source: Option<Source>,
    message: String,
}

impl Error {
    pub fn new<E, M>(source: E, message: M) -> Self
    where
        E: Into<Source>,
        M: Into<String>,
    {
        Self {
            source: Some(source.into()),
            message: message.into(),
        }
    }

    pub fn message<M>(message: M) -> Self
    where
        M: Into<String>,
    {
        Self {
            source: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        Ok(())
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match &self.source {
            Some(source) => Some(&**source),
            None => None,
        }
    }
}

pub trait ErrorExt<T> {
    fn message(self, message: &str) -> Report<T>;

    fn with_message<F, M>(self, f: F) -> Report<T>
    where
        F: FnOnce() -> M,
        M: Into<String>;
}

impl<T, E> ErrorExt<T> for Result<T, E>
where
    E: Into<Source>,
{
    fn message(self, message: &str) -> Report<T> {
        self.map_err(|err| Error::new(err, message))
    }

    fn with_message<F, M>(self, f: F) -> Report<T>
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.map_err(|err| Error::new(err, f()))
    }
}
