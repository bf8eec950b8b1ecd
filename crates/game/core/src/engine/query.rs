use crate::state::{DynamicObject, ObjectType};

/// Filter for nearest-object lookups.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectQuery {
    /// Any live dynamic object, whatever its type.
    AnyDynamic,
    /// Dynamic objects of one type, plus static tiles of that type on the map.
    OfType(ObjectType),
}

impl ObjectQuery {
    pub fn of_type(object_type: impl Into<ObjectType>) -> Self {
        Self::OfType(object_type.into())
    }

    pub fn matches(&self, object: &DynamicObject) -> bool {
        match self {
            Self::AnyDynamic => true,
            Self::OfType(object_type) => object.object_type() == object_type,
        }
    }
}

impl From<ObjectType> for ObjectQuery {
    fn from(object_type: ObjectType) -> Self {
        Self::OfType(object_type)
    }
}

impl From<&str> for ObjectQuery {
    fn from(object_type: &str) -> Self {
        Self::OfType(object_type.into())
    }
}
