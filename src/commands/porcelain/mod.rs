//! Porcelain commands (the user-facing workflow)
//!
//! ## Commands
//!
//! - `prepare`: Rebuild the change set and rewrite the pending document
//! - `review`: Show the draft message and walk the changes hunk by hunk
//! - `message`: Show or replace the draft commit message
//! - `commit`: Validate the message and commit the index

pub mod commit;
pub mod message;
pub mod prepare;
pub mod review;
