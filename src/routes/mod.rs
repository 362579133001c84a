//! Request handlers. Each returns an HTML fragment, a JSON string, or an
//! effects `<script>` for the host page.

pub mod remote;
pub mod roster;
pub mod theme;
pub mod turn;
pub mod util;
pub mod view;
