//! Implementation blocks for cluster types.

pub mod beacon;

pub mod cluster_connector;

pub mod cluster_controller;

pub mod cluster_network;

pub mod cluster_node;

pub mod discovering_request;

pub mod discovering_response;

pub mod discovery_sink;

pub mod inbound_sink;
