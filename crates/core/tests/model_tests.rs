use coin_dashboard_core::errors::CoreError;
use coin_dashboard_core::models::asset::Asset;
use coin_dashboard_core::models::conversion::Conversion;
use coin_dashboard_core::models::currency::Currency;
use coin_dashboard_core::models::history::{PriceHistory, PricePoint};
use coin_dashboard_core::models::timeframe::Timeframe;
use serde_json::json;

// ═══════════════════════════════════════════════════════════════════
//  Asset
// ═══════════════════════════════════════════════════════════════════

mod asset {
    use super::*;

    #[test]
    fn builder_sets_quote_fields() {
        let a = Asset::new("bitcoin", "Bitcoin", "btc", 65_000.0)
            .with_change(-1.5)
            .with_volume(2.0e10)
            .with_market_cap(1.3e12)
            .with_image("https://img/btc.png");

        assert_eq!(a.id, "bitcoin");
        assert_eq!(a.current_price, 65_000.0);
        assert_eq!(a.price_change_percentage_24h, -1.5);
        assert_eq!(a.total_volume, 2.0e10);
        assert_eq!(a.market_cap, 1.3e12);
        assert_eq!(a.image.as_deref(), Some("https://img/btc.png"));
        assert!(a.market_cap_rank.is_none());
    }

    #[test]
    fn deserializes_coingecko_record() {
        let a: Asset = serde_json::from_value(json!({
            "id": "ethereum",
            "symbol": "eth",
            "name": "Ethereum",
            "image": "https://img/eth.png",
            "current_price": 3200.12,
            "market_cap": 385000000000.0,
            "market_cap_rank": 2,
            "total_volume": 15000000000.0,
            "price_change_percentage_24h": -0.83,
            "circulating_supply": 120000000.0,
            "total_supply": null,
            "ath": 4878.26,
            "atl": 0.43,
            "last_updated": "2024-05-01T12:00:00.000Z",
            "fully_diluted_valuation": 385000000000.0
        }))
        .unwrap();

        assert_eq!(a.symbol, "eth");
        assert_eq!(a.market_cap_rank, Some(2));
        assert_eq!(a.circulating_supply, Some(120_000_000.0));
        assert!(a.total_supply.is_none());
        assert_eq!(a.ath, Some(4878.26));
    }

    #[test]
    fn null_quotes_become_zero() {
        let a: Asset = serde_json::from_value(json!({
            "id": "fresh",
            "symbol": "frsh",
            "name": "Fresh",
            "current_price": null,
            "price_change_percentage_24h": null
        }))
        .unwrap();

        assert_eq!(a.current_price, 0.0);
        assert_eq!(a.price_change_percentage_24h, 0.0);
        assert_eq!(a.total_volume, 0.0);
        assert_eq!(a.market_cap, 0.0);
    }

    #[test]
    fn optional_fields_omitted_when_absent() {
        let value = serde_json::to_value(Asset::new("bitcoin", "Bitcoin", "btc", 1.0)).unwrap();
        assert!(value.get("market_cap_rank").is_none());
        assert!(value.get("ath").is_none());
        assert_eq!(value["current_price"], 1.0);
        assert_eq!(value["image"], serde_json::Value::Null);
    }

    #[test]
    fn matches_name_or_symbol() {
        let a = Asset::new("usd-coin", "USD Coin", "USDC", 1.0);
        assert!(a.matches_lowercase("coin"));
        assert!(a.matches_lowercase("usdc"));
        assert!(a.matches_lowercase(""));
        assert!(!a.matches_lowercase("tether"));
        // The id alone is not searched
        assert!(!a.matches_lowercase("usd-"));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  PricePoint / PriceHistory
// ═══════════════════════════════════════════════════════════════════

mod history {
    use super::*;

    #[test]
    fn point_is_a_two_element_array() {
        let p = PricePoint::new(1_700_000_000_000, 42.5);
        assert_eq!(serde_json::to_value(p).unwrap(), json!([1_700_000_000_000i64, 42.5]));
    }

    #[test]
    fn point_accepts_fractional_timestamp() {
        let p: PricePoint = serde_json::from_value(json!([1700000000000.75, 10.0])).unwrap();
        assert_eq!(p.timestamp_ms, 1_700_000_000_000);
        assert_eq!(p.price, 10.0);
    }

    #[test]
    fn history_from_market_chart() {
        let h: PriceHistory = serde_json::from_value(json!({
            "prices": [[3000, 3.0], [1000, 1.0]],
            "market_caps": [[1000, 9.0]],
            "total_volumes": []
        }))
        .unwrap();

        assert_eq!(h.prices.len(), 2);
        assert_eq!(h.market_caps.as_ref().map(Vec::len), Some(1));
        assert_eq!(h.total_volumes.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn history_serializes_prices_only() {
        let h = PriceHistory::from_prices(vec![PricePoint::new(1, 2.0)]);
        assert_eq!(serde_json::to_value(&h).unwrap(), json!({ "prices": [[1, 2.0]] }));
    }

    #[test]
    fn sort_is_stable_and_lossless() {
        let mut h = PriceHistory::from_prices(vec![
            PricePoint::new(3, 30.0),
            PricePoint::new(1, 10.0),
            PricePoint::new(2, 20.0),
            PricePoint::new(1, 11.0),
        ]);
        h.market_caps = Some(vec![PricePoint::new(2, 0.0), PricePoint::new(1, 0.0)]);
        h.sort_by_timestamp();

        let prices: Vec<f64> = h.prices.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![10.0, 11.0, 20.0, 30.0]);
        assert!(h
            .market_caps
            .unwrap()
            .windows(2)
            .all(|w| w[0].timestamp_ms <= w[1].timestamp_ms));
    }

    #[test]
    fn empty_history() {
        assert!(PriceHistory::default().is_empty());
        assert!(!PriceHistory::from_prices(vec![PricePoint::new(0, 1.0)]).is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Timeframe
// ═══════════════════════════════════════════════════════════════════

mod timeframe {
    use super::*;

    #[test]
    fn days_per_timeframe() {
        let days: Vec<u32> = Timeframe::ALL.iter().map(|t| t.days()).collect();
        assert_eq!(days, vec![1, 7, 30, 90, 365]);
    }

    #[test]
    fn default_is_seven_days() {
        assert_eq!(Timeframe::default(), Timeframe::Week);
    }

    #[test]
    fn labels_round_trip() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.to_string().parse::<Timeframe>().unwrap(), tf);
            assert_eq!(serde_json::to_value(tf).unwrap(), json!(tf.label()));
        }
        assert_eq!("1Y".parse::<Timeframe>().unwrap(), Timeframe::Year);
    }

    #[test]
    fn unknown_label() {
        let err = "2w".parse::<Timeframe>().unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Currency / Conversion
// ═══════════════════════════════════════════════════════════════════

mod currency {
    use super::*;

    #[test]
    fn fixed_set() {
        let codes: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
        assert_eq!(codes, vec!["USD", "EUR", "GBP", "JPY", "KES", "BTC", "ETH"]);
    }

    #[test]
    fn crypto_flag() {
        let crypto: Vec<Currency> = Currency::ALL.into_iter().filter(|c| c.is_crypto()).collect();
        assert_eq!(crypto, vec![Currency::Btc, Currency::Eth]);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("kes".parse::<Currency>().unwrap(), Currency::Kes);
        assert_eq!(" Eth ".parse::<Currency>().unwrap(), Currency::Eth);
    }

    #[test]
    fn parse_unknown() {
        match "chf".parse::<Currency>() {
            Err(CoreError::UnsupportedCurrency(code)) => assert_eq!(code, "CHF"),
            other => panic!("expected UnsupportedCurrency, got {other:?}"),
        }
    }

    #[test]
    fn names() {
        assert_eq!(Currency::Kes.name(), "Kenyan Shilling");
        assert_eq!(Currency::Btc.name(), "Bitcoin");
    }

    #[test]
    fn conversion_serializes_codes() {
        let c = Conversion {
            amount: 1.0,
            from: Currency::Usd,
            to: Currency::Btc,
            rate: 0.00002,
            result: 0.00002,
            source: "Coinbase".into(),
        };
        let value = serde_json::to_value(&c).unwrap();
        assert_eq!(value["from"], "USD");
        assert_eq!(value["to"], "BTC");
        assert_eq!(value["source"], "Coinbase");
    }
}
