//! Ticker → CoinGecko id resolution

/// CoinGecko id for a ticker symbol. Unknown symbols are assumed to already
/// be an id and are lowercased.
pub fn resolve_token_id(symbol: &str) -> String {
    let symbol = symbol.trim();
    let id = match symbol.to_uppercase().as_str() {
        "BTC" => "bitcoin",
        "ETH" => "ethereum",
        "USDC" => "usd-coin",
        "USDT" => "tether",
        "DAI" => "dai",
        "UNI" => "uniswap",
        "LINK" => "chainlink",
        "AAVE" => "aave",
        "COMP" => "compound-governance-token",
        "CRV" => "curve-dao-token",
        "SUSHI" => "sushi",
        "YFI" => "yearn-finance",
        "BAL" => "balancer",
        "SNX" => "havven",
        "MKR" => "maker",
        "REN" => "republic-protocol",
        "BAND" => "band-protocol",
        "ZRX" => "0x",
        "BAT" => "basic-attention-token",
        "REP" => "augur",
        _ => return symbol.to_lowercase(),
    };
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symbols() {
        assert_eq!(resolve_token_id("BTC"), "bitcoin");
        assert_eq!(resolve_token_id("eth"), "ethereum");
        assert_eq!(resolve_token_id(" snx "), "havven");
    }

    #[test]
    fn test_unknown_symbol_lowercased() {
        assert_eq!(resolve_token_id("Solana"), "solana");
    }
}
