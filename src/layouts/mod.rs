mod hierarchical;

pub use hierarchical::TreeLayout;
