mod business_member;

pub use business_member::BusinessMember;
