use std::fmt;

/// HTTP status code of a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct StatusCode(u16);

impl StatusCode {
    /// Wraps a raw status code.
    #[inline]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The raw status code.
    #[inline]
    pub const fn code(self) -> u16 {
        self.0
    }

    #[inline]
    const fn class(self) -> u16 {
        self.0 / 100
    }

    /// `1xx`
    #[inline]
    pub const fn is_informational(self) -> bool {
        self.class() == 1
    }

    /// `2xx`
    #[inline]
    pub const fn is_successful(self) -> bool {
        self.class() == 2
    }

    /// `3xx`
    #[inline]
    pub const fn is_redirection(self) -> bool {
        self.class() == 3
    }

    /// `4xx`
    #[inline]
    pub const fn is_client_error(self) -> bool {
        self.class() == 4
    }

    /// `5xx`
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.class() == 5
    }

    /// Outside `100..=599`.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 < 100 || self.0 > 599
    }
}

impl From<u16> for StatusCode {
    #[inline]
    fn from(code: u16) -> Self {
        Self::new(code)
    }
}

impl From<StatusCode> for u16 {
    #[inline]
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl PartialEq<u16> for StatusCode {
    #[inline]
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}

impl PartialEq<StatusCode> for u16 {
    #[inline]
    fn eq(&self, other: &StatusCode) -> bool {
        *self == other.0
    }
}
