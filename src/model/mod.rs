//! Data transfer objects shared by the server API and the web client.

pub mod api;
pub mod camera;
pub mod camp;
pub mod dashboard;
pub mod emergency;
pub mod map;
pub mod resource;
pub mod subdivision;
pub mod team;
pub mod water_level;

/// Implements `From` in both directions between a DTO enum and its SeaORM
/// counterpart with identically named variants.
#[cfg(feature = "server")]
macro_rules! mirror_active_enum {
    ($dto:ty, $db:ty, [$($variant:ident),+ $(,)?]) => {
        impl From<$db> for $dto {
            fn from(value: $db) -> Self {
                type Db = $db;
                match value {
                    $(Db::$variant => Self::$variant,)+
                }
            }
        }

        impl From<$dto> for $db {
            fn from(value: $dto) -> Self {
                type Dto = $dto;
                match value {
                    $(Dto::$variant => Self::$variant,)+
                }
            }
        }
    };
}

#[cfg(feature = "server")]
pub(crate) use mirror_active_enum;
