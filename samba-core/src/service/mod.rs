use crate::model::{BuildGraph, Target};

pub mod action_parser;
pub mod build_parser;
pub mod compile;
pub mod dispatch;
pub mod executor;
pub mod runner;
pub mod settings_parser;

impl BuildGraph {
    pub fn get_all_target_names(&self) -> Vec<String> {
        self.targets.keys().cloned().collect()
    }

    pub fn get_target_by_name(&self, name: &str) -> Option<&Target> {
        self.targets.get(name)
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }
}
