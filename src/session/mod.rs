//! Mount-to-teardown lifecycle of a backdrop.

pub mod backdrop;
