pub mod business_handler;

pub use business_handler::{
    __path_get_business, __path_update_business, __path_upload_cover, get_business,
    update_business, upload_cover,
};
