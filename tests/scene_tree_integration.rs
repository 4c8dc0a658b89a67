//! Integration tests for mounting, querying, and removing tree nodes.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test scene_tree_integration
//! ```

use simscene::math::vec3d::Point;
use simscene::scene::node::{Node, Script};
use simscene::scene::shapes::Circle2D;
use simscene::scene::tree::Tree;

fn family() -> (Tree, simscene::scene::tree::NodeId) {
    let mut tree = Tree::new();
    let root = tree.mount_root(
        Node::blank("Father")
            .with_child(Node::blank("Son"))
            .with_child(Node::blank("Daughter").with_child(Node::blank("GrandSon"))),
    );
    (tree, root)
}

// =============================================================================
// Mounting and tagging
// =============================================================================

#[test]
fn mount_root_assigns_the_declared_tag() {
    let (tree, root) = family();
    assert_eq!(tree.get(root).unwrap().tag, "Father");
}

#[test]
fn empty_tags_default_to_the_kind_name() {
    let mut tree = Tree::new();
    let root = tree.mount_root(Node::blank("Root"));
    let circle = tree
        .mount(Node::from(Circle2D::default()), root)
        .unwrap();
    assert_eq!(tree.get(circle).unwrap().tag, "Circle2D");

    let blank = tree.mount(Node::new(simscene::scene::node::NodeKind::Blank), root);
    assert_eq!(tree.get(blank.unwrap()).unwrap().tag, "Node");
}

#[test]
fn mount_into_a_missing_parent_fails() {
    let (mut tree, root) = family();
    let daughter = tree.get_node(root, "Daughter").unwrap();
    tree.remove(daughter);
    assert!(tree.mount(Node::blank("Orphan"), daughter).is_none());
}

#[test]
fn mounted_children_know_their_parent() {
    let (tree, root) = family();
    let son = tree.get_node(root, "Son").unwrap();
    assert_eq!(tree.get(son).unwrap().parent(), Some(root));
    assert!(tree.get(root).unwrap().parent().is_none());
}

struct Nest;

impl Script for Nest {
    fn type_name(&self) -> &'static str {
        "Nest"
    }

    fn build(&mut self) -> Vec<Node> {
        vec![Node::blank("Egg").with_child(Node::blank("Yolk"))]
    }
}

#[test]
fn build_children_are_mounted_after_declared_children() {
    let mut tree = Tree::new();
    let root = tree.mount_root(Node::script(Nest).with_child(Node::blank("Twig")));
    let children = tree.get(root).unwrap().children().to_vec();
    assert_eq!(children.len(), 2);
    assert_eq!(tree.get(children[0]).unwrap().tag, "Twig");
    assert_eq!(tree.get(children[1]).unwrap().tag, "Egg");
    assert!(tree.get_node(root, "Egg.Yolk").is_some());
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn world_collects_every_descendant_but_not_self() {
    let (tree, root) = family();
    let nodes = tree.world(root);
    assert_eq!(nodes.len(), 3);
    assert!(!nodes.contains(&root));

    let tags: Vec<String> = nodes
        .iter()
        .map(|id| tree.get(*id).unwrap().tag.clone())
        .collect();
    assert!(tags.contains(&"Son".to_string()));
    assert!(tags.contains(&"Daughter".to_string()));
    assert!(tags.contains(&"GrandSon".to_string()));
}

#[test]
fn world_lists_each_node_before_its_own_descendants() {
    let (tree, root) = family();
    let tags: Vec<String> = tree
        .world(root)
        .iter()
        .map(|id| tree.get(*id).unwrap().tag.clone())
        .collect();
    assert_eq!(tags, vec!["Son", "Daughter", "GrandSon"]);
}

#[test]
fn get_node_resolves_direct_children_and_dotted_paths() {
    let (tree, root) = family();
    let son = tree.get_node(root, "Son").unwrap();
    assert_eq!(tree.get(son).unwrap().tag, "Son");

    let grandson = tree.get_node(root, "Daughter.GrandSon").unwrap();
    assert_eq!(tree.get(grandson).unwrap().tag, "GrandSon");
}

#[test]
fn get_node_misses_return_none() {
    let (tree, root) = family();
    assert!(tree.get_node(root, "Uncle").is_none());
    assert!(tree.get_node(root, "Son.GrandSon").is_none());
    assert!(tree.get_node(root, "").is_none());
}

#[test]
fn group_membership() {
    let mut tree = Tree::new();
    let root = tree.mount_root(Node::blank("Help Me").in_group("Lonely"));
    assert!(tree.get(root).unwrap().is_in_group("Lonely"));
    assert!(!tree.get(root).unwrap().is_in_group("Popular"));
}

#[test]
fn get_nodes_in_group_searches_the_whole_subtree() {
    let mut tree = Tree::new();
    let root = tree.mount_root(
        Node::blank("Family")
            .with_child(Node::blank("Max").in_group("Dead"))
            .with_child(Node::blank("Ella").in_group("Dead"))
            .with_child(Node::blank("Beatrice").with_child(Node::blank("Me").in_group("Dead"))),
    );
    let dead = tree.get_nodes_in_group(root, "Dead");
    assert_eq!(dead.len(), 3);

    let tags: Vec<String> = dead
        .iter()
        .map(|id| tree.get(*id).unwrap().tag.clone())
        .collect();
    assert!(tags.contains(&"Max".to_string()));
    assert!(tags.contains(&"Ella".to_string()));
    assert!(tags.contains(&"Me".to_string()));
}

// =============================================================================
// Positions
// =============================================================================

#[test]
fn blank_nodes_have_no_position() {
    let (tree, root) = family();
    assert!(tree.position(root).is_none());
}

#[test]
fn shape_nodes_expose_their_position() {
    let mut tree = Tree::new();
    let root = tree.mount_root(Node::blank("Root"));
    let circle = tree
        .mount(
            Node::from(Circle2D::new(
                Point::xy(30.0, 40.0),
                5.0,
                simscene::math::color::Color::WHITE,
            )),
            root,
        )
        .unwrap();
    assert_eq!(tree.position(circle), Some(Point::xy(30.0, 40.0)));

    tree.get_mut(circle).unwrap().set_position(Point::xy(1.0, 2.0));
    assert_eq!(tree.position(circle), Some(Point::xy(1.0, 2.0)));
}

// =============================================================================
// Removal and slot reuse
// =============================================================================

#[test]
fn remove_detaches_the_whole_subtree() {
    let (mut tree, root) = family();
    let daughter = tree.get_node(root, "Daughter").unwrap();
    let grandson = tree.get_node(root, "Daughter.GrandSon").unwrap();

    assert!(tree.remove(daughter));
    assert!(!tree.contains(daughter));
    assert!(!tree.contains(grandson));
    assert_eq!(tree.world(root).len(), 1);
    assert!(tree.get_node(root, "Daughter").is_none());
}

#[test]
fn removing_a_missing_node_is_a_no_op() {
    let (mut tree, root) = family();
    let son = tree.get_node(root, "Son").unwrap();
    assert!(tree.remove(son));
    assert!(!tree.remove(son));
    assert_eq!(tree.len(), 3);
    let _ = root;
}

#[test]
fn slots_are_reused_after_removal() {
    let (mut tree, root) = family();
    let before = tree.len();
    let son = tree.get_node(root, "Son").unwrap();
    tree.remove(son);

    let replacement = tree.mount(Node::blank("Stepson"), root).unwrap();
    assert_eq!(tree.len(), before);
    assert_eq!(tree.get(replacement).unwrap().tag, "Stepson");
}

#[test]
fn stale_handles_stay_dead_after_slot_reuse() {
    let (mut tree, root) = family();
    let son = tree.get_node(root, "Son").unwrap();
    tree.remove(son);

    // The replacement lands in the freed slot; the old handle must not
    // resolve to it.
    let replacement = tree.mount(Node::blank("Stepson"), root).unwrap();
    assert_ne!(son, replacement);
    assert!(!tree.contains(son));
    assert!(!tree.remove(son));
    assert_eq!(tree.get(replacement).unwrap().tag, "Stepson");
}

#[test]
fn len_counts_live_nodes() {
    let (mut tree, root) = family();
    assert_eq!(tree.len(), 4);
    assert!(!tree.is_empty());

    let daughter = tree.get_node(root, "Daughter").unwrap();
    tree.remove(daughter);
    assert_eq!(tree.len(), 2);
}
