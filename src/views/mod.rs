pub(crate) mod dialog;
pub(crate) mod home;
pub(crate) mod list;
