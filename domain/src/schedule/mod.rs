//! Schedule consensus domain
//!
//! Members answer yes / maybe / no for each candidate date; the best scored
//! option can then be selected as the meeting date by an administrator.

pub mod consensus;
pub mod entities;

pub use consensus::{
    OptionScore, ScheduleError, calculate_winner, rank_options, rank_scores, record_preference,
    select_winner, selected_option,
};
pub use entities::{Preference, ScheduleOption, ScheduleVote};
