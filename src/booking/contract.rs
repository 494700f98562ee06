//! Rental contract terms shown in the contract view

/// Refundable security deposit in euros
pub const SECURITY_DEPOSIT_EUR: u64 = 200;

/// One numbered clause of the rental contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractClause {
    pub heading: &'static str,
    pub body: &'static str,
}

/// Clauses in display order
pub static CONTRACT_CLAUSES: [ContractClause; 5] = [
    ContractClause {
        heading: "1. Vehicle",
        body: "The Lessor rents out the motorcycle described on the listing page, in good working order.",
    },
    ContractClause {
        heading: "2. Rental Period",
        body: "The rental starts at the pickup date and time and ends at the return date and time specified.",
    },
    ContractClause {
        heading: "3. Security Deposit",
        body: "A security deposit of €200 is required, refundable when the motorcycle is returned in the same condition.",
    },
    ContractClause {
        heading: "4. Use of the Motorcycle",
        body: "The Lessee agrees to ride safely and within all traffic laws. Subletting, racing and carrying hazardous goods are not allowed.",
    },
    ContractClause {
        heading: "5. Cancellation",
        body: "Bookings may be cancelled up to 48 hours in advance for a full refund. Later cancellations are non-refundable.",
    },
];

/// Opening paragraph of the contract
pub const CONTRACT_PREAMBLE: &str = "This Motorcycle Rental Agreement is made between the Lessor (Wheel Deal on behalf of the owner) and the Lessee (you).";

/// Closing paragraph of the contract
pub const CONTRACT_ACCEPTANCE: &str =
    "By accepting, you confirm that you have read, understood and agreed to the terms of this contract.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deposit_clause_matches_constant() {
        let clause = CONTRACT_CLAUSES
            .iter()
            .find(|c| c.heading.contains("Deposit"))
            .unwrap();
        assert!(clause.body.contains(&format!("€{}", SECURITY_DEPOSIT_EUR)));
    }
}
