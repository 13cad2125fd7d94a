use std::io::Read;

/// A reader a request body can be pulled from on any thread.
pub trait BodyStream: Read + Send + Sync + 'static {}

impl<S: Read + Send + Sync + 'static + ?Sized> BodyStream for S {}

/// An owned, type-erased [`BodyStream`].
pub type BoxedStream = Box<dyn BodyStream>;

/// A wire body with a blocking stream.
pub type Body = crate::body::Body<BoxedStream>;
