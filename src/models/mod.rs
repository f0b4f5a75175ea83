//! Data models module
//!
//! This module contains all data structures used throughout the client core

pub mod contact;
pub mod event;
pub mod member;
pub mod registration;
pub mod submission;

// Re-export commonly used models
pub use contact::{Contact, ContactStatus, CreateContactRequest};
pub use event::{
    CreateEventRequest, Event, EventResults, EventStatus, EventType, UpdateEventRequest, Winner,
};
pub use member::{
    CreateMemberRequest, Department, Member, MemberProfile, MemberStatus, MembershipType, Position,
    PositionRecord, PositionRole, PromotionRequest, UpdateMemberRequest, UpdateProfileRequest,
};
pub use registration::{
    CreateRegistrationRequest, ParticipantSnapshot, Registration, RegistrationStatus, TeamMember,
};
pub use submission::{
    Award, AwardPosition, AwardUpdate, CreateSubmissionRequest, FileRef, Submission,
    SubmissionStatus,
};
