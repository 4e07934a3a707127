//! Status helper enum mapping to the SMALLSERIAL lookup table.
//!
//! Variant discriminants match the seed data order (1-based) in the
//! `optimization_statuses` database table.

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

macro_rules! define_status_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:expr ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Return the database status ID.
            pub fn id(self) -> StatusId {
                self as StatusId
            }

            /// The seed-data name, as serialized on the status endpoint.
            pub fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }

            /// Look up a variant by its database ID.
            pub fn from_id(id: StatusId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl From<$name> for StatusId {
            fn from(value: $name) -> Self {
                value as StatusId
            }
        }
    };
}

define_status_enum! {
    /// Optimization job lifecycle status.
    OptimizationStatus {
        Pending = 1,
        InProgress = 2,
        Completed = 3,
        Failed = 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimization_status_ids_match_seed_data() {
        assert_eq!(OptimizationStatus::Pending.id(), 1);
        assert_eq!(OptimizationStatus::InProgress.id(), 2);
        assert_eq!(OptimizationStatus::Completed.id(), 3);
        assert_eq!(OptimizationStatus::Failed.id(), 4);
    }

    #[test]
    fn status_into_status_id() {
        let id: StatusId = OptimizationStatus::Pending.into();
        assert_eq!(id, 1);
    }

    #[test]
    fn status_names_match_seed_data() {
        assert_eq!(OptimizationStatus::Pending.name(), "Pending");
        assert_eq!(OptimizationStatus::InProgress.name(), "InProgress");
        assert_eq!(OptimizationStatus::Completed.name(), "Completed");
        assert_eq!(OptimizationStatus::Failed.name(), "Failed");
    }

    #[test]
    fn from_id_roundtrips() {
        for status in [
            OptimizationStatus::Pending,
            OptimizationStatus::InProgress,
            OptimizationStatus::Completed,
            OptimizationStatus::Failed,
        ] {
            assert_eq!(OptimizationStatus::from_id(status.id()), Some(status));
        }
        assert_eq!(OptimizationStatus::from_id(99), None);
    }
}
