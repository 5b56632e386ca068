//! Browser entry point: mounts the explorer to `<body>`.

use dgx_topology_explorer::{App, init_logging};
use leptos::prelude::*;

fn main() {
	init_logging();
	mount_to_body(App);
}
