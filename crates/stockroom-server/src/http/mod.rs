// SPDX-License-Identifier: Apache-2.0

pub(crate) mod categories;
pub(crate) mod health;
pub(crate) mod products;
pub(crate) mod request_tracing;
pub(crate) mod responses;
