pub mod header;
pub mod meat_chips;
pub mod recommend_button;
pub mod recommendation_panel;
pub mod upload_area;
