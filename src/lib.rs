// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod cli;
pub mod crud;
pub mod db;
pub mod defaults;
pub mod entity;
pub mod error;
pub mod finance;
pub mod ledger;
pub mod models;
pub mod utils;
pub mod commands;
