/// Verdict returned by a middleware invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Keep executing the chain.
    Continue,
    /// Stop here. In a before-chain this suppresses the controller and the
    /// after-chain; in an after-chain it only ends the remaining after
    /// middleware.
    Stop,
}

/// An opaque middleware callable, invoked with the captured path variables
/// in token-declaration order.
pub trait Middleware: Send + Sync {
    fn call(&self, args: &[String]) -> Flow;
}

impl<F> Middleware for F
where
    F: Fn(&[String]) -> Flow + Send + Sync,
{
    fn call(&self, args: &[String]) -> Flow {
        self(args)
    }
}
