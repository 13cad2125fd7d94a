use futures_io::AsyncRead;

/// An async reader a request body can be pulled from on any executor.
pub trait BodyStream: AsyncRead + Send + Sync + Unpin + 'static {}

impl<S: AsyncRead + Send + Sync + Unpin + 'static + ?Sized> BodyStream for S {}

/// An owned, type-erased [`BodyStream`].
pub type BoxedStream = Box<dyn BodyStream>;

/// A wire body with an async stream.
pub type Body = crate::body::Body<BoxedStream>;
