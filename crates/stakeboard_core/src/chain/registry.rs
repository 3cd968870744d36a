//! Static per-chain network table.
//!
//! Values mirror what each network accepted at the time they were tuned:
//! fees are display-unit strings, gas limits are integers.

use super::config::{ChainConfig, FeeTable, GasTable, WalletConfig, WalletSupport};
use super::key::ChainKey;

macro_rules! symbol_image {
    ($file:literal) => {
        concat!("/images/symbol/", $file)
    };
}

pub(super) static CHAINS: [ChainConfig; 20] = [
    ChainConfig {
        key: ChainKey::Cosmos,
        chain_id: "cosmoshub-4",
        name: "cosmos",
        img_url: symbol_image!("cosmos.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "cosmos",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-cosmos.cosmostation.io",
        symbol_name: "ATOM",
        denom: "uatom",
        decimal: 6,
        coingecko_id: "cosmos",
        validator_icon_directory: "cosmoshub",
        mintscan_path: "cosmos",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Iris,
        chain_id: "irishub-1",
        name: "iris",
        img_url: symbol_image!("iris.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "iaa",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: true,
        },
        lcd_url: "https://lcd-iris.cosmostation.io",
        symbol_name: "IRIS",
        denom: "uiris",
        decimal: 6,
        coingecko_id: "iris-network",
        validator_icon_directory: "irishub",
        mintscan_path: "iris",
        fee: FeeTable {
            default: "0.2",
            delegate: "0.6",
            undelegate: "0.6",
            redelegate: "0.6",
            withdraw: "0.6",
            withdraw_reward: "0.6",
            withdraw_commission: "0.6",
            modify_withdraw_address: "0.6",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Kava,
        chain_id: "kava-8",
        name: "kava",
        img_url: symbol_image!("kava.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "kava",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-kava.cosmostation.io",
        symbol_name: "KAVA",
        denom: "ukava",
        decimal: 6,
        coingecko_id: "kava",
        validator_icon_directory: "kava/kava-2",
        mintscan_path: "kava",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 500_000,
            undelegate: 500_000,
            redelegate: 500_000,
            withdraw: 400_000,
            withdraw_reward: 500_000,
            withdraw_commission: 500_000,
            modify_withdraw_address: 500_000,
        },
    },
    ChainConfig {
        key: ChainKey::Band,
        chain_id: "laozi-mainnet",
        name: "band",
        img_url: symbol_image!("band.png"),
        wallet: WalletConfig {
            hd_path: "44/494/0/0/0",
            prefix: "band",
            support: WalletSupport {
                ledger: false,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-band.cosmostation.io",
        symbol_name: "BAND",
        denom: "uband",
        decimal: 6,
        coingecko_id: "band-protocol",
        validator_icon_directory: "bandprotocol",
        mintscan_path: "band",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Akash,
        chain_id: "akashnet-2",
        name: "akash",
        img_url: symbol_image!("akash.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "akash",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-akash.cosmostation.io",
        symbol_name: "AKT",
        denom: "uakt",
        decimal: 6,
        coingecko_id: "akash-network",
        validator_icon_directory: "akash",
        mintscan_path: "akash",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 400_000,
            redelegate: 400_000,
            withdraw: 900_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Certik,
        chain_id: "shentu-2.2",
        name: "certik",
        img_url: symbol_image!("certik.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "certik",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: true,
        },
        lcd_url: "https://lcd-certik.cosmostation.io",
        symbol_name: "CTK",
        denom: "uctk",
        decimal: 6,
        coingecko_id: "certik",
        validator_icon_directory: "certik",
        mintscan_path: "certik",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.0075",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Sentinel,
        chain_id: "sentinelhub-2",
        name: "sentinel",
        img_url: symbol_image!("sentinel.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "sent",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-sentinel.cosmostation.io",
        symbol_name: "DVPN",
        denom: "udvpn",
        decimal: 6,
        coingecko_id: "sentinel-group",
        validator_icon_directory: "sentinel",
        mintscan_path: "sentinel",
        fee: FeeTable {
            default: "0.02",
            delegate: "0.02",
            undelegate: "0.02",
            redelegate: "0.03",
            withdraw: "0.03",
            withdraw_reward: "0.02",
            withdraw_commission: "0.02",
            modify_withdraw_address: "0.02",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Persistence,
        chain_id: "core-1",
        name: "persistence",
        img_url: symbol_image!("persistence.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "persistence",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-persistence.cosmostation.io",
        symbol_name: "XPRT",
        denom: "uxprt",
        decimal: 6,
        coingecko_id: "persistence",
        validator_icon_directory: "persistence",
        mintscan_path: "persistence",
        fee: FeeTable {
            default: "0",
            delegate: "0",
            undelegate: "0",
            redelegate: "0",
            withdraw: "0",
            withdraw_reward: "0",
            withdraw_commission: "0",
            modify_withdraw_address: "0",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::FetchAi,
        chain_id: "fetchhub-2",
        name: "fetch.ai",
        img_url: symbol_image!("fetch-ai.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "fetch",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-fetchai.cosmostation.io",
        symbol_name: "FET",
        denom: "afet",
        decimal: 18,
        coingecko_id: "fetch-ai",
        validator_icon_directory: "fetchai",
        mintscan_path: "fetchai",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Sifchain,
        chain_id: "sifchain-1",
        name: "sifchain",
        img_url: symbol_image!("sifchain.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "sif",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-sifchain.cosmostation.io",
        symbol_name: "ROWAN",
        denom: "rowan",
        decimal: 18,
        coingecko_id: "sifchain",
        validator_icon_directory: "sif",
        mintscan_path: "sifchain",
        fee: FeeTable {
            default: "0.1",
            delegate: "0.1",
            undelegate: "0.1",
            redelegate: "0.1",
            withdraw: "0.1",
            withdraw_reward: "0.1",
            withdraw_commission: "0.1",
            modify_withdraw_address: "0.1",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 400_000,
            redelegate: 400_000,
            withdraw: 200_000,
            withdraw_reward: 300_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::CryptoOrg,
        chain_id: "crypto-org-chain-mainnet-1",
        name: "crypto.org",
        img_url: symbol_image!("crypto-org.png"),
        wallet: WalletConfig {
            hd_path: "44/394/0/0/0",
            prefix: "cro",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-cryptocom.cosmostation.io",
        symbol_name: "CRO",
        denom: "basecro",
        decimal: 8,
        coingecko_id: "crypto-com-chain",
        validator_icon_directory: "cryto",
        mintscan_path: "crypto-org",
        fee: FeeTable {
            default: "0.00005",
            delegate: "0.00005",
            undelegate: "0.000075",
            redelegate: "0.000075",
            withdraw: "0.000075",
            withdraw_reward: "0.00005",
            withdraw_commission: "0.00005",
            modify_withdraw_address: "0.00005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Kichain,
        chain_id: "kichain-2",
        name: "kichain",
        img_url: symbol_image!("kichain.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "ki",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-kichain.cosmostation.io",
        symbol_name: "XKI",
        denom: "uxki",
        decimal: 6,
        coingecko_id: "ki",
        validator_icon_directory: "ki",
        mintscan_path: "ki-chain",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.0075",
            withdraw: "0.0075",
            withdraw_reward: "0.0075",
            withdraw_commission: "0.0075",
            modify_withdraw_address: "0.0075",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Starname,
        chain_id: "iov-mainnet-ibc",
        name: "starname",
        img_url: symbol_image!("starname.png"),
        wallet: WalletConfig {
            hd_path: "44/234/0/0/0",
            prefix: "star",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-iov.cosmostation.io",
        symbol_name: "IOV",
        denom: "uiov",
        decimal: 6,
        coingecko_id: "starname",
        validator_icon_directory: "iov",
        mintscan_path: "starname",
        fee: FeeTable {
            default: "0.2",
            delegate: "0.2",
            undelegate: "0.2",
            redelegate: "0.2",
            withdraw: "0.2",
            withdraw_reward: "0.2",
            withdraw_commission: "0.2",
            modify_withdraw_address: "0.2",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 300_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Medibloc,
        chain_id: "panacea-3",
        name: "medibloc",
        img_url: symbol_image!("medibloc.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "panacea",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-medibloc.cosmostation.io",
        symbol_name: "MED",
        denom: "umed",
        decimal: 6,
        coingecko_id: "medibloc",
        validator_icon_directory: "medibloc",
        mintscan_path: "medibloc",
        fee: FeeTable {
            default: "1",
            delegate: "1",
            undelegate: "1",
            redelegate: "1",
            withdraw: "1",
            withdraw_reward: "1",
            withdraw_commission: "1",
            modify_withdraw_address: "1",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Emoney,
        chain_id: "emoney-3",
        name: "emoney",
        img_url: symbol_image!("emoney.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "emoney",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-emoney.cosmostation.io",
        symbol_name: "NGM",
        denom: "ungm",
        decimal: 6,
        coingecko_id: "e-money",
        validator_icon_directory: "emoney",
        mintscan_path: "emoney",
        fee: FeeTable {
            default: "0.25",
            delegate: "0.25",
            undelegate: "0.25",
            redelegate: "0.3",
            withdraw: "0.25",
            withdraw_reward: "0.25",
            withdraw_commission: "0.25",
            modify_withdraw_address: "0.25",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Rizon,
        chain_id: "titan-1",
        name: "rizon",
        img_url: symbol_image!("rizon.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "rizon",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-rizon.cosmostation.io",
        symbol_name: "ATOLO",
        denom: "uatolo",
        decimal: 6,
        coingecko_id: "hdac",
        validator_icon_directory: "rizon",
        mintscan_path: "rizon",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Juno,
        chain_id: "juno-1",
        name: "juno",
        img_url: symbol_image!("juno.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "juno",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-juno.cosmostation.io",
        symbol_name: "JUNO",
        denom: "ujuno",
        decimal: 6,
        coingecko_id: "juno-network",
        validator_icon_directory: "juno",
        mintscan_path: "juno",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Bitcanna,
        chain_id: "bitcanna-1",
        name: "bitcanna",
        img_url: symbol_image!("bitcanna.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "bcna",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: true,
        },
        lcd_url: "https://lcd-bitcanna.cosmostation.io",
        symbol_name: "BCNA",
        denom: "ubcna",
        decimal: 6,
        coingecko_id: "bitcanna",
        validator_icon_directory: "bitcanna",
        mintscan_path: "bitcanna",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Regen,
        chain_id: "regen-1",
        name: "regen",
        img_url: symbol_image!("regen.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "regen",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: false,
        },
        lcd_url: "https://lcd-regen.cosmostation.io",
        symbol_name: "REGEN",
        denom: "uregen",
        decimal: 6,
        coingecko_id: "regen",
        validator_icon_directory: "regen",
        mintscan_path: "regen",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.005",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
    ChainConfig {
        key: ChainKey::Comdex,
        chain_id: "comdex-1",
        name: "comdex",
        img_url: symbol_image!("comdex.png"),
        wallet: WalletConfig {
            hd_path: "44/118/0/0/0",
            prefix: "comdex",
            support: WalletSupport {
                ledger: true,
                keystation: true,
            },
            is_proto: true,
        },
        lcd_url: "https://lcd-comdex.cosmostation.io",
        symbol_name: "CMDX",
        denom: "ucmdx",
        decimal: 6,
        coingecko_id: "comdex",
        validator_icon_directory: "comdex",
        mintscan_path: "comdex",
        fee: FeeTable {
            default: "0.005",
            delegate: "0.005",
            undelegate: "0.005",
            redelegate: "0.0075",
            withdraw: "0.005",
            withdraw_reward: "0.005",
            withdraw_commission: "0.005",
            modify_withdraw_address: "0.005",
        },
        gas: GasTable {
            default: 200_000,
            delegate: 200_000,
            undelegate: 200_000,
            redelegate: 300_000,
            withdraw: 200_000,
            withdraw_reward: 200_000,
            withdraw_commission: 200_000,
            modify_withdraw_address: 200_000,
        },
    },
];
