//! ShadowTalk identity helpers
//!
//! The anonymous id is a client-local random token. It is not a credential
//! and offers no anonymity guarantee beyond not being tied to an account.

pub mod anon_id;
pub mod prompts;

pub use anon_id::{ANON_ID_PREFIX, generate_anon_id, is_valid_anon_id};
pub use prompts::{PROMPTS, next_prompt, random_prompt};
