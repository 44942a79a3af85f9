use super::errors::CartError;

/// A request parameter as the transport delivered it, before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RawParam {
    #[default]
    Absent,
    Integer(i64),
    /// Present, but not readable as an integer.
    Malformed,
}

impl RawParam {
    /// Absent and zero count as "not provided", matching how form posts and
    /// loosely typed clients send empty values.
    pub fn is_provided(&self) -> bool {
        !matches!(self, RawParam::Absent | RawParam::Integer(0))
    }

    fn integer(self) -> Result<i64, CartError> {
        match self {
            RawParam::Integer(value) if value != 0 => Ok(value),
            RawParam::Malformed => Err(CartError::InvalidParameters),
            _ => Err(CartError::MissingParameters),
        }
    }
}

impl From<i64> for RawParam {
    fn from(value: i64) -> Self {
        RawParam::Integer(value)
    }
}

impl From<Option<i64>> for RawParam {
    fn from(value: Option<i64>) -> Self {
        value.map_or(RawParam::Absent, RawParam::Integer)
    }
}

/// Catalog identifier of a product. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(i64);

impl ProductId {
    /// Parses a request parameter: absent or zero is `MissingParameters`,
    /// negative or malformed is `InvalidParameters`.
    pub fn parse(raw: impl Into<RawParam>) -> Result<Self, CartError> {
        Self::try_from(raw.into().integer()?)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for ProductId {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(CartError::InvalidParameters)
        }
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of units on a cart line. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub fn parse(raw: impl Into<RawParam>) -> Result<Self, CartError> {
        Self::try_from(raw.into().integer()?)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Additive merge of two quantities. Overflow is reported as
    /// `InvalidParameters` rather than wrapping.
    pub fn merged_with(self, other: Quantity) -> Result<Quantity, CartError> {
        self.0
            .checked_add(other.0)
            .map(Quantity)
            .ok_or(CartError::InvalidParameters)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = CartError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u32::try_from(value) {
            Ok(quantity) if quantity > 0 => Ok(Self(quantity)),
            _ => Err(CartError::InvalidParameters),
        }
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque key the cart store assigns to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey(String);

impl LineKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LineKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validates the `(product_id, quantity)` pair of add and update requests.
///
/// Presence of both values is checked before either is interpreted, so a
/// request missing one parameter always reports `MissingParameters` even if
/// the other one is malformed.
pub fn parse_line_request(
    product_id: impl Into<RawParam>,
    quantity: impl Into<RawParam>,
) -> Result<(ProductId, Quantity), CartError> {
    let (product_id, quantity) = (product_id.into(), quantity.into());
    if !product_id.is_provided() || !quantity.is_provided() {
        return Err(CartError::MissingParameters);
    }

    Ok((ProductId::parse(product_id)?, Quantity::parse(quantity)?))
}
