//! Domain models with validation at construction
//!
//! Request input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod owner;
pub mod pet;

pub use validation::{positive_id, ValidationError, MAX_TEXT_LEN};
pub use owner::{NewOwner, Owner, OwnerFullName};
pub use pet::{Pet, PetDraft, PetLookup};
