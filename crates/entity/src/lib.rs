pub mod action_schedule;
pub mod contact;
pub mod contribution;
pub mod job;
pub mod membership;
pub mod membership_payment;
pub mod membership_status;
pub mod membership_type;
pub mod relationship;

pub use action_schedule::Entity as ActionSchedule;
pub use contact::Entity as Contact;
pub use contribution::Entity as Contribution;
pub use job::Entity as Job;
pub use membership::Entity as Membership;
pub use membership_payment::Entity as MembershipPayment;
pub use membership_status::Entity as MembershipStatus;
pub use membership_type::Entity as MembershipType;
pub use relationship::Entity as Relationship;
