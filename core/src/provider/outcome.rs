//! Result of an asynchronous connect

use std::fmt;

use crate::pool::ConnectionPool;

/// Outcome of [`ConnectionProvider::connect`](super::ConnectionProvider::connect)
///
/// The pool handle is kept even when establishment failed, so a caller that
/// relies on the handle after an error can still reach it. Use
/// [`ConnectOutcome::into_result`] for the stricter view where a handle is
/// only returned on success.
pub struct ConnectOutcome<P: ConnectionPool> {
    pool: P,
    error: Option<P::Error>,
}

impl<P: ConnectionPool> ConnectOutcome<P> {
    pub fn new(pool: P, error: Option<P::Error>) -> Self {
        Self { pool, error }
    }

    /// The pool handle, connected or not
    pub fn pool(&self) -> &P {
        &self.pool
    }

    /// The establishment error, if any
    pub fn error(&self) -> Option<&P::Error> {
        self.error.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.error.is_none()
    }

    /// Split into the handle and the error
    pub fn into_parts(self) -> (P, Option<P::Error>) {
        (self.pool, self.error)
    }

    /// Keep the handle only on success; the handle is dropped on failure
    pub fn into_result(self) -> Result<P, P::Error> {
        match self.error {
            None => Ok(self.pool),
            Some(error) => Err(error),
        }
    }
}

impl<P> fmt::Debug for ConnectOutcome<P>
where
    P: ConnectionPool + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOutcome")
            .field("pool", &self.pool)
            .field("error", &self.error)
            .finish()
    }
}
