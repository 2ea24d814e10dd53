/*
Rendering of a map with termtree. Children are labelled with the key that
walks to them, so the printout reads like the choices offered in the game.
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Command, MapArena, Side};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for MapArena {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root() else {
            return Tree::new("Mapa vazio".to_string());
        };
        let label = self
            .room(root_idx)
            .map(|room| room.name().to_string())
            .unwrap_or_default();
        let mut tree = Tree::new(label);

        fn build_tree(map: &MapArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            for (side, key) in [(Side::Left, Command::LEFT), (Side::Right, Command::RIGHT)] {
                let Some(child_idx) = map.child(node_idx, side) else {
                    continue;
                };
                if let Some(child) = map.room(child_idx) {
                    let mut child_tree = Tree::new(format!("[{}] {}", key, child.name()));
                    build_tree(map, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        build_tree(self, root_idx, &mut tree);
        tree
    }
}
