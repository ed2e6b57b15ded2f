pub mod club;
pub mod club_application;
pub mod club_member;
pub mod event;
pub mod notification;
pub mod participant;
pub mod rating;
pub mod schedule;
pub mod session;
pub mod status;
pub mod user;
