//! Behavioural scenarios for `r` remote runs.

mod run;
