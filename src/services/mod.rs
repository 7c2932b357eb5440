// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Domain logic independent of HTTP and storage.

pub mod feed;
pub mod password;
pub mod progress;
