pub type CmdResult<T> = brename::Result<(T, i32)>;

pub mod batch;
