pub(crate) mod noise;
pub(crate) mod pointer;
