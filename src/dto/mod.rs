//! Typed request models parsed from submitted forms.
//!
//! Forms arrive as loosely-typed strings (`*Form`, deserialized from
//! `application/x-www-form-urlencoded`) and are converted into validated
//! requests that the services accept. Parsing reports every violated field.

pub mod booking_dto;
pub mod contact_dto;
pub mod payment_dto;
pub mod review_dto;
pub mod vehicle_dto;
