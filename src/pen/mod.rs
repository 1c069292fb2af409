pub(crate) mod broadcaster;
