pub mod blog_queries;
pub mod category_queries;
pub mod contact_queries;
pub mod gallery_queries;
pub mod product_queries;
pub mod subcategory_queries;
