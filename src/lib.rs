//! # blogi-client
//!
//! Client core for the Blogi blogging app: the route table with its
//! session-token guard, and the global user list store.
//!
//! The two halves are independent. Hosts build a [`router::Router`] and a
//! [`store::UserStore`] at startup and hand both to the view layer.

pub mod config;
pub mod net;
pub mod router;
pub mod session;
pub mod store;
