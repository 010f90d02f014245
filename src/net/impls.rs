//! Implementation blocks for engine types.

pub mod acceptor;

pub mod connector;

pub mod framing_codec;

pub mod message;

pub mod reactor;

pub mod session;
