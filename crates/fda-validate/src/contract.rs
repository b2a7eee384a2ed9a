/// A named, versioned record contract and its field order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contract {
    pub name: &'static str,
    pub fields: &'static [&'static str],
}

pub const SILVER_PRODUCTS_V1: Contract = Contract {
    name: "silver_products.v1",
    fields: &[
        "identity",
        "source_key",
        "appl_no",
        "product_no",
        "form",
        "strength",
        "drug_name",
        "active_ingredients",
        "original_approval_date",
        "is_historic_record",
        "content_hash",
    ],
};

pub const GOLD_PRODUCTS_V1: Contract = Contract {
    name: "gold_products.v1",
    fields: &[
        "identity",
        "source_key",
        "appl_no",
        "product_no",
        "form",
        "strength",
        "drug_name",
        "active_ingredients",
        "original_approval_date",
        "is_historic_record",
        "content_hash",
        "sponsor_name",
        "application_type",
        "marketing_status_id",
        "marketing_status_description",
        "te_code",
        "exclusivity_expiration",
        "is_generic",
        "is_protected",
        "search_text",
    ],
};

impl Contract {
    /// Table name without the version suffix.
    pub fn table(&self) -> &'static str {
        self.name.split('.').next().unwrap_or(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gold_extends_silver() {
        assert!(GOLD_PRODUCTS_V1.fields.starts_with(SILVER_PRODUCTS_V1.fields));
        assert_eq!(GOLD_PRODUCTS_V1.table(), "gold_products");
    }
}
