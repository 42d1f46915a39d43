use core::str::FromStr;

pub const MENU: &str = "\
===== STOCKROOM INVENTORY =====
1) Add product
2) Delete product by ID
3) Update quantity by ID
4) Update price by ID
5) Search products by name
6) List all products
7) Summary (items, total value)
0) Quit";

/// One menu entry, keyed by the number the user types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Add,
    Delete,
    UpdateQuantity,
    UpdatePrice,
    Search,
    List,
    Summary,
    Quit,
}

impl FromStr for MenuCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(Self::Add),
            "2" => Ok(Self::Delete),
            "3" => Ok(Self::UpdateQuantity),
            "4" => Ok(Self::UpdatePrice),
            "5" => Ok(Self::Search),
            "6" => Ok(Self::List),
            "7" => Ok(Self::Summary),
            "0" => Ok(Self::Quit),
            other => Err(other.to_string()),
        }
    }
}
