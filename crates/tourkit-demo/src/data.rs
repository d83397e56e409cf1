#![forbid(unsafe_code)]

//! Mock shop data for the dashboard.
//!
//! Static and deterministic so that screenshots and tests line up.

/// Shop filter choices. Index 0 shows every shop.
pub const SHOPS: [&str; 4] = ["All shops", "Northwind", "Harbor & Co", "Juniper"];

/// A SKU with less cover than this many days is flagged.
pub const LOW_STOCK_DAYS: u32 = 7;

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Pending,
    Packed,
    Shipped,
    Refunded,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Packed => "Packed",
            Self::Shipped => "Shipped",
            Self::Refunded => "Refunded",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub id: u32,
    /// Index into [`SHOPS`], never 0.
    pub shop: usize,
    pub customer: &'static str,
    pub items: u16,
    pub total_cents: u64,
    pub status: Status,
    pub placed_min_ago: u32,
}

const fn order(
    id: u32,
    shop: usize,
    customer: &'static str,
    items: u16,
    total_cents: u64,
    status: Status,
    placed_min_ago: u32,
) -> Order {
    Order {
        id,
        shop,
        customer,
        items,
        total_cents,
        status,
        placed_min_ago,
    }
}

const ORDERS: [Order; 12] = [
    order(1042, 1, "J. Park", 3, 12_840, Status::Pending, 4),
    order(1041, 2, "M. Osei", 1, 2_450, Status::Packed, 19),
    order(1040, 3, "R. Lindqvist", 6, 48_200, Status::Pending, 37),
    order(1039, 1, "A. Haddad", 2, 7_990, Status::Shipped, 72),
    order(1038, 2, "T. Nguyen", 4, 31_575, Status::Shipped, 95),
    order(1037, 3, "S. Moreau", 1, 1_800, Status::Refunded, 140),
    order(1036, 1, "K. Brandt", 8, 102_460, Status::Packed, 188),
    order(1035, 2, "L. Costa", 2, 5_600, Status::Shipped, 260),
    order(1034, 3, "D. Okafor", 3, 15_025, Status::Shipped, 415),
    order(1033, 1, "E. Walsh", 5, 26_300, Status::Pending, 610),
    order(1032, 2, "H. Sato", 1, 3_250, Status::Shipped, 1_480),
    order(1031, 3, "P. Novak", 2, 9_900, Status::Refunded, 2_900),
];

/// Column the order list is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Newest,
    Total,
    Status,
}

impl SortKey {
    /// The key `s` switches to.
    pub fn next(self) -> Self {
        match self {
            Self::Newest => Self::Total,
            Self::Total => Self::Status,
            Self::Status => Self::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Total => "total",
            Self::Status => "status",
        }
    }
}

/// Orders for `shop` (0 = all), sorted by `sort`.
pub fn orders(shop: usize, sort: SortKey) -> Vec<Order> {
    let mut out: Vec<Order> = ORDERS
        .iter()
        .copied()
        .filter(|o| shop == 0 || o.shop == shop)
        .collect();
    match sort {
        SortKey::Newest => out.sort_by_key(|o| o.placed_min_ago),
        SortKey::Total => out.sort_by(|a, b| b.total_cents.cmp(&a.total_cents)),
        SortKey::Status => out.sort_by_key(|o| (o.status, o.placed_min_ago)),
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sku {
    pub code: &'static str,
    pub name: &'static str,
    pub shop: usize,
    pub on_hand: u32,
    /// Average units sold per day.
    pub daily_sales: u32,
}

impl Sku {
    /// Whole days the stock lasts at the current rate. `None` when nothing
    /// sells.
    pub fn days_of_cover(&self) -> Option<u32> {
        (self.daily_sales > 0).then(|| self.on_hand / self.daily_sales)
    }

    pub fn is_low(&self) -> bool {
        self.days_of_cover().is_some_and(|d| d < LOW_STOCK_DAYS)
    }
}

const SKUS: [Sku; 8] = [
    Sku { code: "NW-TEA-01", name: "Sencha loose leaf 250g", shop: 1, on_hand: 140, daily_sales: 9 },
    Sku { code: "NW-MUG-04", name: "Stoneware mug, slate", shop: 1, on_hand: 22, daily_sales: 5 },
    Sku { code: "HC-ROPE-2", name: "Cotton rope 10m", shop: 2, on_hand: 310, daily_sales: 12 },
    Sku { code: "HC-LAMP-7", name: "Brass deck lamp", shop: 2, on_hand: 9, daily_sales: 3 },
    Sku { code: "HC-MAP-11", name: "Chart print, north sea", shop: 2, on_hand: 64, daily_sales: 0 },
    Sku { code: "JN-SOAP-3", name: "Juniper soap bar", shop: 3, on_hand: 480, daily_sales: 21 },
    Sku { code: "JN-OIL-05", name: "Cedar beard oil 50ml", shop: 3, on_hand: 35, daily_sales: 6 },
    Sku { code: "JN-CNDL-2", name: "Pine candle, large", shop: 3, on_hand: 97, daily_sales: 4 },
];

/// SKUs for `shop` (0 = all), lowest cover first.
pub fn skus(shop: usize) -> Vec<Sku> {
    let mut out: Vec<Sku> = SKUS
        .iter()
        .copied()
        .filter(|s| shop == 0 || s.shop == shop)
        .collect();
    out.sort_by_key(|s| s.days_of_cover().unwrap_or(u32::MAX));
    out
}

/// `$1,234.50`
pub fn money(cents: u64) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("${grouped}.{:02}", cents % 100)
}

/// Compact age: `4m`, `3h`, `2d`.
pub fn ago(minutes: u32) -> String {
    match minutes {
        0..60 => format!("{minutes}m"),
        60..1440 => format!("{}h", minutes / 60),
        _ => format!("{}d", minutes / 1440),
    }
}
