use kernel::prelude::entity::{SelectLimit, SelectOffset};

#[derive(Debug, Clone, Default)]
pub struct PageDto {
    pub limit: SelectLimit,
    pub offset: SelectOffset,
}
