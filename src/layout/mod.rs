//! Project tree layout
//!
//! Decides where each record lands in the tree and what it is called:
//! naming, shape-based routing, page node splitting and name collisions.

mod collision;
mod naming;
mod nodes;
mod planner;
mod router;

pub use collision::{CollisionPolicy, NameRegistry};
pub use naming::{DEFAULT_NAME, resolve_name, safe_segment, sanitize_file_name};
pub use nodes::{NODE_SEPARATOR, NODES_DIR, NodeKey, page_folder_name, split_nodes};
pub use planner::{CategoryTree, PageBundle, TreeEntry, TreeFile, TreePlanner};
pub use router::{ROUTE_RULES, RouteRule, route};
