// Adapters layer: hosts that put the responder on the wire.

pub mod http;
pub mod lambda;
