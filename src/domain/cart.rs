use super::line_item::LineItem;
use super::money::Money;
use super::product::ProductId;
use crate::error::{CartError, Fault, Result};

/// What a cart does when `add_item` hits a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultMode {
    /// Return the fault to the caller.
    #[default]
    Surface,
    /// Log the fault and report success, leaving the cart untouched.
    Suppress,
}

/// Per-cart behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartPolicy {
    pub faults: FaultMode,
    /// Reject negative unit prices and non-positive quantities.
    pub validate_amounts: bool,
}

impl Default for CartPolicy {
    fn default() -> Self {
        Self {
            faults: FaultMode::Surface,
            validate_amounts: true,
        }
    }
}

impl CartPolicy {
    /// Swallow faults and accept any amount, as older carts did.
    pub fn legacy() -> Self {
        Self {
            faults: FaultMode::Suppress,
            validate_amounts: false,
        }
    }
}

/// A customer's shopping cart.
///
/// Line items keep insertion order and are unique by product. The cart total is always
/// the exact sum of the line totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart<P = ProductId> {
    customer_id: String,
    items: Vec<LineItem<P>>,
    policy: CartPolicy,
}

impl<P: PartialEq> Cart<P> {
    /// Creates an empty cart for `customer_id`.
    pub fn new(customer_id: impl Into<String>) -> Self {
        Self {
            customer_id: customer_id.into(),
            items: Vec::new(),
            policy: CartPolicy::default(),
        }
    }

    /// Creates a cart from an existing collection of line items.
    ///
    /// # Errors
    ///
    /// Returns `CartError::DuplicateProduct` with the index of the first item whose product
    /// already appeared earlier, or `Fault::AmountOverflow` if the items cannot be totalled.
    pub fn with_items(
        customer_id: impl Into<String>,
        items: impl Into<Vec<LineItem<P>>>,
    ) -> Result<Self> {
        let items = items.into();

        for (i, item) in items.iter().enumerate() {
            if items
                .iter()
                .take(i)
                .any(|earlier| earlier.product() == item.product())
            {
                return Err(CartError::DuplicateProduct(i));
            }
        }

        items
            .iter()
            .map(LineItem::line_total)
            .try_fold(Money::ZERO, Money::checked_add)?;

        Ok(Self {
            customer_id: customer_id.into(),
            items,
            policy: CartPolicy::default(),
        })
    }

    pub fn with_policy(mut self, policy: CartPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Adds `quantity` units of `product` at `unit_price`.
    ///
    /// If the product is already in the cart its quantity grows by `quantity` and its unit
    /// price becomes `unit_price` when the two differ. Otherwise a new line item is appended.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Fault` when the amounts are rejected or would overflow, unless the
    /// cart's policy suppresses faults. The cart is unchanged whenever a fault occurs.
    pub fn add_item(&mut self, product: P, unit_price: Money, quantity: i64) -> Result<()> {
        match self.try_add(product, unit_price, quantity) {
            Ok(()) => Ok(()),
            Err(fault) => match self.policy.faults {
                FaultMode::Surface => Err(fault.into()),
                FaultMode::Suppress => {
                    tracing::warn!(
                        customer = %self.customer_id,
                        %unit_price,
                        quantity,
                        error = %fault,
                        "add_item fault suppressed"
                    );
                    Ok(())
                }
            },
        }
    }

    fn try_add(
        &mut self,
        product: P,
        unit_price: Money,
        quantity: i64,
    ) -> std::result::Result<(), Fault> {
        if self.policy.validate_amounts {
            if unit_price.is_negative() {
                return Err(Fault::NegativePrice);
            }
            if quantity <= 0 {
                return Err(Fault::NonPositiveQuantity);
            }
        }

        let existing = self.items.iter().position(|item| item.product() == &product);

        // Work out the resulting line before touching anything.
        let (new_price, new_quantity) = match existing.and_then(|i| self.items.get(i)) {
            Some(item) => {
                let price = if item.unit_price().is_identical(&unit_price) {
                    item.unit_price()
                } else {
                    unit_price
                };
                let quantity = item
                    .quantity()
                    .checked_add(quantity)
                    .ok_or(Fault::QuantityOverflow)?;
                (price, quantity)
            }
            None => (unit_price, quantity),
        };
        let new_line = new_price.times(new_quantity)?;
        self.checked_total_with(existing, new_line)?;

        match existing.and_then(|i| self.items.get_mut(i)) {
            Some(item) => item.update(new_price, new_quantity)?,
            None => self
                .items
                .push(LineItem::new(product, new_price, new_quantity)?),
        }

        Ok(())
    }

    /// The total the cart would have with `line` at `replaced`, or appended when `None`.
    ///
    /// Folds in the same order as `total()`, so a success here means `total()` is exact.
    fn checked_total_with(
        &self,
        replaced: Option<usize>,
        line: Money,
    ) -> std::result::Result<Money, Fault> {
        let appended = replaced.is_none().then_some(line);
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if Some(i) == replaced {
                    line
                } else {
                    item.line_total()
                }
            })
            .chain(appended)
            .try_fold(Money::ZERO, Money::checked_add)
    }

    /// Removes the line item for `product`. Returns `false` if it was not in the cart.
    pub fn remove_item(&mut self, product: &P) -> bool {
        match self.items.iter().position(|item| item.product() == product) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        }
    }

    /// Removes the line item at `position` in insertion order and returns it.
    ///
    /// # Errors
    ///
    /// Returns `CartError::InvalidPosition` if `position` is not below `len()`.
    pub fn remove_item_at(&mut self, position: usize) -> Result<LineItem<P>> {
        if position >= self.items.len() {
            return Err(CartError::InvalidPosition {
                position: i64::try_from(position).unwrap_or(i64::MAX),
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(position))
    }

    /// Sum of all line totals. Zero for an empty cart.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn items(&self) -> &[LineItem<P>] {
        &self.items
    }

    pub fn get(&self, position: usize) -> Option<&LineItem<P>> {
        self.items.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem<P>> {
        self.items.iter()
    }

    pub fn customer_id(&self) -> &str {
        &self.customer_id
    }

    pub fn policy(&self) -> CartPolicy {
        self.policy
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
