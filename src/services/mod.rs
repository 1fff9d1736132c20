pub mod approval;
pub mod documents;
pub mod normalize;
pub mod numbering;
pub mod question_tree;
pub mod workflow;
