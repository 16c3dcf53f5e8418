//! prakriti-auth
//!
//! The signed-in session the screens are built with: who the user is and
//! whether their profile carries the administrator flag. Sign-up and sign-in
//! happen against the hosted auth service; this crate only reads the
//! resulting access token.

pub mod error;
pub mod flows;
pub mod jwt;
pub mod session;
