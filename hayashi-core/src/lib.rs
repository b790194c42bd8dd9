//! `hayashi-core` is a crate that provides the timing engine of a vertical scrolling rhythm game:
//! notes approaching a judgement line, hit windows and per-lane note tracks.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![deny(unsafe_code)]

extern crate alloc;

mod macros;

pub mod chart;
pub mod input;
pub mod note;
pub mod scroll;
pub mod timing;
pub mod track;
