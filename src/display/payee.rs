//! Payee display formatting

use crate::models::Payee;

pub fn format_payee_list(payees: &[Payee]) -> String {
    if payees.is_empty() {
        return "No payees found.".to_string();
    }

    let mut output = String::new();
    for payee in payees {
        output.push_str(&format!("{}\n", payee.name));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BudgetId;

    #[test]
    fn test_payee_list() {
        assert_eq!(format_payee_list(&[]), "No payees found.");
        let payees = vec![Payee::new(BudgetId::new(), "Grocer")];
        assert_eq!(format_payee_list(&payees), "Grocer\n");
    }
}
