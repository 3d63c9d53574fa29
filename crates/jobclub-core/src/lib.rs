//! Domain types for the Job Club API.
//!
//! This crate holds the onboarding form and its validation rules, the member
//! record mirrored into downstream systems, and the event/resource documents
//! read from the content store. Nothing here performs I/O.

pub mod career_goal;
pub mod content;
pub mod form;
pub mod member;

pub use career_goal::CareerGoal;
pub use content::{Event, EventType, Resource, Slug, Speaker};
pub use form::{is_valid_email, GraduationYear, OnboardingForm, OnboardingSubmission};
pub use member::{MemberProfile, OnboardingStatus, MEMBER_DOCUMENT_TYPE};
