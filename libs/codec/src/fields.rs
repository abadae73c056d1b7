//! Feed field names bound by the entity kinds
//!
//! These are the dictionary names looked up when a dispatch table is built.
//! A deployment whose dictionary uses different names maps them with
//! [`FieldAliases`](crate::schema::FieldAliases).

/// Fields every entity kind binds
pub mod common {
    pub const SYMBOL: &str = "wSymbol";
    pub const ISSUE_SYMBOL: &str = "wIssueSymbol";
    pub const PART_ID: &str = "wPartId";
    pub const SRC_TIME: &str = "wSrcTime";
    pub const ACTIVITY_TIME: &str = "wActivityTime";
    pub const LINE_TIME: &str = "wLineTime";
    pub const SEND_TIME: &str = "MamaSendTime";
    pub const PUB_ID: &str = "wPubId";
    pub const SEQ_NUM: &str = "wSeqNum";
}

pub mod trade {
    pub const TRADE_PRICE: &str = "wTradePrice";
    pub const TRADE_VOLUME: &str = "wTradeVolume";
    pub const TRADE_PART_ID: &str = "wTradePartId";
    pub const TRADE_TIME: &str = "wTradeTime";
    pub const TRADE_DATE: &str = "wTradeDate";
    pub const IRREG_PRICE: &str = "wIrregPrice";
    pub const IRREG_SIZE: &str = "wIrregSize";
    pub const IRREG_PART_ID: &str = "wIrregPartId";
    pub const IRREG_TIME: &str = "wIrregTime";
    pub const IS_IRREGULAR: &str = "wIsIrregular";
    pub const TRADE_DIRECTION: &str = "wTradeTick";
    pub const AGGRESSOR_SIDE: &str = "wAggressorSide";
    pub const TRADE_SIDE: &str = "wTradeSide";
    pub const TRADE_COUNT: &str = "wTradeCount";
    pub const CONFLATE_COUNT: &str = "wConflateTradeCount";
    pub const UPDATE_AS_TRADE: &str = "wUpdateAsTrade";
    pub const ACCUM_VOLUME: &str = "wTotalVolume";
    pub const OPEN_PRICE: &str = "wOpenPrice";
    pub const HIGH_PRICE: &str = "wHighPrice";
    pub const LOW_PRICE: &str = "wLowPrice";
    pub const CLOSE_PRICE: &str = "wClosePrice";
    pub const PREV_CLOSE_PRICE: &str = "wPrevClosePrice";
    pub const NET_CHANGE: &str = "wNetChange";
    pub const PCT_CHANGE: &str = "wPctChange";
    pub const TRADE_QUALIFIER: &str = "wTradeQualifier";
    pub const SALE_CONDITION: &str = "wSaleCondition";
    pub const STOP_STOCK_INDICATOR: &str = "wStopStockIndicator";
    pub const EXEC_VENUE: &str = "wTradeExecVenue";
    pub const TRADE_ID: &str = "wTradeId";
    pub const ORIG_TRADE_ID: &str = "wOrigTradeId";
    pub const CORR_TRADE_ID: &str = "wCorrTradeId";
    pub const ORIG_PRICE: &str = "wOrigPrice";
    pub const ORIG_SIZE: &str = "wOrigSize";
    pub const ORIG_PART_ID: &str = "wOrigPartId";
    pub const ORIG_SEQ_NUM: &str = "wOrigSeqNum";
    pub const CORR_PRICE: &str = "wCorrPrice";
    pub const CORR_SIZE: &str = "wCorrSize";
    pub const CORR_PART_ID: &str = "wCorrPartId";
    pub const CORR_TIME: &str = "wCorrTime";
    pub const CANCEL_TIME: &str = "wCancelTime";
    pub const SHORT_SALE_CIRCUIT_BREAKER: &str = "wShortSaleCircuitBreaker";
    pub const VWAP: &str = "wVwap";
    pub const TOTAL_VALUE: &str = "wTotalValue";

    pub const REQUIRED: &[&str] = &[TRADE_PRICE, TRADE_VOLUME];
}

pub mod quote {
    pub const BID_PRICE: &str = "wBidPrice";
    pub const BID_SIZE: &str = "wBidSize";
    pub const BID_PART_ID: &str = "wBidPartId";
    pub const BID_DEPTH: &str = "wBidDepth";
    pub const BID_CLOSE: &str = "wBidClose";
    pub const PREV_BID_CLOSE: &str = "wPrevBidClose";
    pub const BID_HIGH: &str = "wBidHigh";
    pub const BID_LOW: &str = "wBidLow";
    pub const ASK_PRICE: &str = "wAskPrice";
    pub const ASK_SIZE: &str = "wAskSize";
    pub const ASK_PART_ID: &str = "wAskPartId";
    pub const ASK_DEPTH: &str = "wAskDepth";
    pub const ASK_CLOSE: &str = "wAskClose";
    pub const PREV_ASK_CLOSE: &str = "wPrevAskClose";
    pub const ASK_HIGH: &str = "wAskHigh";
    pub const ASK_LOW: &str = "wAskLow";
    pub const QUOTE_SEQ_NUM: &str = "wQuoteSeqNum";
    pub const QUOTE_DATE: &str = "wQuoteDate";
    pub const QUOTE_TIME: &str = "wQuoteTime";
    pub const QUOTE_QUALIFIER: &str = "wQuoteQualifier";
    pub const CONDITION: &str = "wCondition";
    pub const QUOTE_COUNT: &str = "wQuoteCount";
    pub const CONFLATE_COUNT: &str = "wConflateQuoteCount";
    pub const SHORT_SALE_BID_TICK: &str = "wShortSaleBidTick";
    pub const SHORT_SALE_CIRCUIT_BREAKER: &str = "wShortSaleCircuitBreaker";

    pub const REQUIRED: &[&str] = &[BID_PRICE, ASK_PRICE];
}

pub mod imbalance {
    pub const HIGH_INDICATION_PRICE: &str = "wHighIndicationPrice";
    pub const LOW_INDICATION_PRICE: &str = "wLowIndicationPrice";
    pub const INDICATION_PRICE: &str = "wIndicationPrice";
    pub const BUY_VOLUME: &str = "wBuyVolume";
    pub const SELL_VOLUME: &str = "wSellVolume";
    pub const MATCH_VOLUME: &str = "wMatchVolume";
    pub const SECURITY_STATUS_QUAL: &str = "wSecStatusQual";
    pub const INSIDE_MATCH_PRICE: &str = "wInsideMatchPrice";
    pub const FAR_CLEARING_PRICE: &str = "wFarClearingPrice";
    pub const NEAR_CLEARING_PRICE: &str = "wNearClearingPrice";
    pub const NO_CLEARING_PRICE: &str = "wNoClearingPrice";
    pub const PRICE_VAR_IND: &str = "wPriceVarInd";
    pub const CROSS_TYPE: &str = "wCrossType";
    pub const EVENT_TIME: &str = "wEventTime";
    pub const EVENT_SEQ_NUM: &str = "wEventSeqNum";
    pub const SECURITY_STATUS_TIME: &str = "wSecStatusTime";
    pub const AUCTION_TIME: &str = "wAuctionTime";
    pub const SECURITY_STATUS_ORIG: &str = "wSecStatusOrig";

    pub const REQUIRED: &[&str] = &[SECURITY_STATUS_QUAL];
}

pub mod security_status {
    pub const SECURITY_STATUS: &str = "wSecStatus";
    pub const SECURITY_STATUS_QUAL: &str = "wSecStatusQual";
    pub const SECURITY_STATUS_NATIVE: &str = "wSecStatusNative";
    pub const SECURITY_TYPE: &str = "wSecurityType";
    pub const SECURITY_ACTION: &str = "wSecurityAction";
    pub const SHORT_SALE_CIRCUIT_BREAKER: &str = "wShortSaleCircuitBreaker";
    pub const REASON: &str = "wReason";
    pub const FREE_TEXT: &str = "wFreeText";
    pub const SECURITY_STATUS_TIME: &str = "wSecStatusTime";
    pub const EVENT_SEQ_NUM: &str = "wEventSeqNum";
    pub const SECURITY_STATUS_ORIG: &str = "wSecStatusOrig";

    pub const REQUIRED: &[&str] = &[SECURITY_STATUS];
}

pub mod fundamentals {
    pub const CORP_ACT_TYPE: &str = "wCorpActType";
    pub const DIV_FREQ: &str = "wDivFreq";
    pub const DIV_EX_DATE: &str = "wDivExDate";
    pub const DIV_PAY_DATE: &str = "wDivPayDate";
    pub const DIV_RECORD_DATE: &str = "wDivRecordDate";
    pub const DIV_CURRENCY: &str = "wDivCurrency";
    pub const DIVIDEND_PRICE: &str = "wDividendPrice";
    pub const MARKET_SEGMENT: &str = "wMarketSegment";
    pub const MARKET_SECTOR: &str = "wMarketSector";
    pub const MARKET_SEGMENT_NATIVE: &str = "wMarketSegmentNative";
    pub const MARKET_SECTOR_NATIVE: &str = "wMarketSectorNative";
    pub const SHARES_OUT: &str = "wSharesOut";
    pub const SHARES_FLOAT: &str = "wSharesFloat";
    pub const SHARES_AUTH: &str = "wSharesAuth";
    pub const EARN_PER_SHARE: &str = "wEarnPerShare";
    pub const PE_RATIO: &str = "wPeRatio";
    pub const DIVIDEND_YIELD: &str = "wYield";
    pub const VOLATILITY: &str = "wVolatility";
    pub const HIST_VOLATILITY: &str = "wHistVolatility";
    pub const RISK_FREE_RATE: &str = "wRiskFreeRate";

    pub const REQUIRED: &[&str] = &[];
}
